pub mod generate_recipes;

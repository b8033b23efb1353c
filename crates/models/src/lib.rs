pub mod errors;
pub mod db;
pub mod tour_package;
pub mod tour;
pub mod tour_rating;

#[cfg(test)]
mod tests;

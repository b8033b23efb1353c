use models::tour::{Difficulty, Region};

pub type TourPackage = models::tour_package::Model;
pub type Tour = models::tour::Model;
pub use models::tour::NewTour;

/// Tour creation input; the package is referenced by its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourInput {
    pub package_name: String,
    pub title: String,
    pub description: String,
    pub blurb: String,
    pub price: i32,
    pub duration: String,
    pub bullets: String,
    pub keywords: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

impl TourInput {
    pub fn into_new_tour(self, tour_package_code: String) -> NewTour {
        NewTour {
            title: self.title,
            description: self.description,
            blurb: self.blurb,
            price: self.price,
            duration: self.duration,
            bullets: self.bullets,
            keywords: self.keywords,
            tour_package_code,
            difficulty: self.difficulty,
            region: self.region,
        }
    }
}

use crate::patch::Patch;

pub type TourRating = models::tour_rating::Model;

/// A rating that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub tour_id: i32,
    pub customer_id: i32,
    pub score: i32,
    pub comment: Option<String>,
}

/// Fields of a partial rating update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingPatch {
    pub score: Patch<i32>,
    pub comment: Patch<String>,
}

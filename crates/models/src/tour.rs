use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, tour_package, tour_rating};

/// How demanding a tour is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[sea_orm(string_value = "EASY")]
    Easy,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "DIFFICULT")]
    Difficult,
    #[sea_orm(string_value = "VARIES")]
    Varies,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Difficult => "DIFFICULT",
            Difficulty::Varies => "VARIES",
        }
    }
}

impl FromStr for Difficulty {
    type Err = errors::ModelError;

    /// Case-insensitive; seed files spell these `Easy`, `Difficult`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "DIFFICULT" => Ok(Difficulty::Difficult),
            "VARIES" => Ok(Difficulty::Varies),
            other => Err(errors::ModelError::Validation(format!("unknown difficulty: {other}"))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Part of California a tour runs in, identified by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Region {
    #[sea_orm(string_value = "Central Coast")]
    #[serde(rename = "Central Coast")]
    CentralCoast,
    #[sea_orm(string_value = "Southern California")]
    #[serde(rename = "Southern California")]
    SouthernCalifornia,
    #[sea_orm(string_value = "Northern California")]
    #[serde(rename = "Northern California")]
    NorthernCalifornia,
    #[sea_orm(string_value = "Varies")]
    #[serde(rename = "Varies")]
    Varies,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::CentralCoast => "Central Coast",
            Region::SouthernCalifornia => "Southern California",
            Region::NorthernCalifornia => "Northern California",
            Region::Varies => "Varies",
        }
    }

    pub const ALL: [Region; 4] = [
        Region::CentralCoast,
        Region::SouthernCalifornia,
        Region::NorthernCalifornia,
        Region::Varies,
    ];

    pub fn find_by_label(label: &str) -> Result<Self, errors::ModelError> {
        Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| errors::ModelError::Validation(format!("unknown region: {label}")))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub blurb: String,
    pub price: i32,
    pub duration: String,
    #[sea_orm(column_type = "Text")]
    pub bullets: String,
    #[sea_orm(column_type = "Text")]
    pub keywords: String,
    pub tour_package_code: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { TourPackage, TourRating }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::TourPackage => Entity::belongs_to(tour_package::Entity)
                .from(Column::TourPackageCode)
                .to(tour_package::Column::Code)
                .into(),
            Relation::TourRating => Entity::has_many(tour_rating::Entity).into(),
        }
    }
}

impl Related<tour_package::Entity> for Entity {
    fn to() -> RelationDef { Relation::TourPackage.def() }
}

impl Related<tour_rating::Entity> for Entity {
    fn to() -> RelationDef { Relation::TourRating.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values of a tour that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTour {
    pub title: String,
    pub description: String,
    pub blurb: String,
    pub price: i32,
    pub duration: String,
    pub bullets: String,
    pub keywords: String,
    pub tour_package_code: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

pub async fn create(db: &DatabaseConnection, new: NewTour) -> Result<Model, errors::ModelError> {
    if new.title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    if new.price < 0 { return Err(errors::ModelError::Validation("price must be >= 0".into())); }
    let am = ActiveModel {
        title: Set(new.title),
        description: Set(new.description),
        blurb: Set(new.blurb),
        price: Set(new.price),
        duration: Set(new.duration),
        bullets: Set(new.bullets),
        keywords: Set(new.keywords),
        tour_package_code: Set(new.tour_package_code),
        difficulty: Set(new.difficulty),
        region: Set(new.region),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_difficulty(db: &DatabaseConnection, difficulty: Difficulty) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::Difficulty.eq(difficulty))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_package_code(db: &DatabaseConnection, code: &str) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::TourPackageCode.eq(code))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_any_case() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("DIFFICULT".parse::<Difficulty>().unwrap(), Difficulty::Difficult);
        assert_eq!(" varies ".parse::<Difficulty>().unwrap(), Difficulty::Varies);
        assert!("Extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn region_resolves_by_label() {
        assert_eq!(Region::find_by_label("Central Coast").unwrap(), Region::CentralCoast);
        assert_eq!(Region::find_by_label("northern california").unwrap(), Region::NorthernCalifornia);
        assert!(Region::find_by_label("Nevada").is_err());
    }

    #[test]
    fn enums_serialize_to_wire_values() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"MEDIUM\"");
        assert_eq!(serde_json::to_string(&Region::SouthernCalifornia).unwrap(), "\"Southern California\"");
    }
}

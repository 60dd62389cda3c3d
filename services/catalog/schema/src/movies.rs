use sea_orm::entity::prelude::*;

/// Movie record. Poster and trailer are flattened into nullable columns;
/// cast entries live in `movie_cast`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub story_line: String,
    pub director_id: Option<Uuid>,
    pub writers: Vec<Uuid>,
    pub release_date: Date,
    pub status: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub language: String,
    pub poster_url: Option<String>,
    pub poster_public_id: Option<String>,
    pub poster_responsive: Vec<String>,
    pub trailer_url: Option<String>,
    pub trailer_public_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_cast::Entity")]
    MovieCast,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::movie_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieCast.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

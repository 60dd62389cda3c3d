use crate::domain::repository::{MovieRepository, ReviewRepository, UserRepository};
use crate::domain::types::AppInfo;
use crate::error::CatalogError;

pub struct AppInfoUseCase<M: MovieRepository, R: ReviewRepository, U: UserRepository> {
    pub movies: M,
    pub reviews: R,
    pub users: U,
}

impl<M: MovieRepository, R: ReviewRepository, U: UserRepository> AppInfoUseCase<M, R, U> {
    pub async fn execute(&self) -> Result<AppInfo, CatalogError> {
        Ok(AppInfo {
            movie_count: self.movies.count().await?,
            review_count: self.reviews.count().await?,
            user_count: self.users.count().await?,
        })
    }
}

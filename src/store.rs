use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
    sea_query::{Expr, NullOrdering, Order},
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MoviePatch, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every movie, best rated first. Unrated movies sort last and equal
    /// ratings keep insertion order.
    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .order_by_with_nulls(movie::Column::Rating, Order::Desc, NullOrdering::Last)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound(id))
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(new.rating),
            ranking: Set(None),
            review: Set(new.review),
            img_url: Set(new.img_url),
        };

        match model.insert(&self.db).await.map_err(AppError::from) {
            Ok(movie) => {
                tracing::info!(movie_id = movie.id, title = %movie.title, "movie added");
                Ok(movie)
            },
            Err(AppError::Conflict(_)) => {
                Err(AppError::Conflict(format!("a movie titled \"{title}\" is already in the list")))
            },
            Err(err) => Err(err),
        }
    }

    pub async fn update(&self, id: i32, patch: MoviePatch) -> AppResult<movie::Model> {
        let current = self.get(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let mut model: movie::ActiveModel = current.into();
        if let Some(rating) = patch.rating {
            model.rating = Set(Some(rating));
        }
        if let Some(review) = patch.review {
            model.review = Set(Some(review));
        }

        Ok(model.update(&self.db).await?)
    }

    /// Writes one rank. A movie deleted since the list was read matches no
    /// row, which is not an error. Returns the number of rows written.
    pub async fn set_ranking(&self, id: i32, rank: i32) -> AppResult<u64> {
        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Ranking, Expr::value(rank))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            tracing::debug!(movie_id = id, rank, "rank target vanished");
        }
        Ok(res.rows_affected)
    }

    /// Deletes by id. Returns the number of rows removed; a missing id is not an error.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected > 0 {
            tracing::info!(movie_id = id, "movie deleted");
        } else {
            tracing::debug!(movie_id = id, "delete matched no movie");
        }
        Ok(res.rows_affected)
    }
}

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use super::base_traits::{HasBaseColumns, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

type Model<E> = <E as EntityTrait>::Model;
type ActiveModel<E> = <E as EntityTrait>::ActiveModel;

/// Generic access to a soft-deletable table.
///
/// Reads go through [`DaoBase::live`], so a row whose `deleted_at` is set is
/// never returned, updated or deleted again by anything built on this trait.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    Model<Self::Entity>: FromQueryResult + IntoActiveModel<ActiveModel<Self::Entity>> + Send + Sync,
    ActiveModel<Self::Entity>:
        ActiveModelTrait<Entity = Self::Entity> + HasIdActiveModel + TimestampedActiveModel + Send,
    Self::Entity: HasBaseColumns,
{
    type Entity: EntityTrait + Send + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn live() -> Select<Self::Entity> {
        Self::Entity::find().filter(Self::Entity::deleted_at_column().is_null())
    }

    async fn find_all(&self) -> DaoResult<Vec<Model<Self::Entity>>> {
        Self::live()
            .order_by_asc(Self::Entity::created_at_column())
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<Model<Self::Entity>> {
        let model = Self::live()
            .filter(Self::Entity::id_column().eq(id))
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        model.ok_or_else(|| DaoLayerError::not_found::<Self::Entity>(id))
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<ActiveModel<Self::Entity>> + Send,
    ) -> DaoResult<Model<Self::Entity>> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    /// Writes the `Set` columns of `active` onto live row `id`, bumps
    /// `updated_at` and returns the stored row.
    async fn save(
        &self,
        id: Uuid,
        mut active: ActiveModel<Self::Entity>,
    ) -> DaoResult<Model<Self::Entity>> {
        active.set_updated_at(Utc::now().fixed_offset());
        let result = Self::Entity::update_many()
            .set(active)
            .filter(Self::Entity::id_column().eq(id))
            .filter(Self::Entity::deleted_at_column().is_null())
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::not_found::<Self::Entity>(id));
        }
        self.find_by_id(id).await
    }

    async fn soft_delete(&self, id: Uuid) -> DaoResult<()> {
        let result = Self::Entity::update_many()
            .col_expr(
                Self::Entity::deleted_at_column(),
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(Self::Entity::id_column().eq(id))
            .filter(Self::Entity::deleted_at_column().is_null())
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::not_found::<Self::Entity>(id));
        }

        Ok(())
    }
}

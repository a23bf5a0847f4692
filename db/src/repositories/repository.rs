use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait,
};
use std::future::Future;
use std::pin::Pin;

/// Boxed, `Send` future returned by repository methods.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'a>>;

/// The capability set every entity repository offers: Create, Get, Update, Delete.
///
/// Implementors are zero-sized adapters over a SeaORM entity; they add
/// entity-specific finders as inherent methods. Every method takes the
/// connection explicitly so the same code runs against the pool or inside a
/// `DatabaseTransaction`.
pub trait Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    fn create<'a, C>(db: &'a C, active_model: E::ActiveModel) -> RepoFuture<'a, E::Model>
    where
        C: ConnectionTrait,
    {
        Box::pin(async move { active_model.insert(db).await })
    }

    fn find_by_id<'a, C>(
        db: &'a C,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> RepoFuture<'a, Option<E::Model>>
    where
        C: ConnectionTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Send + 'a,
    {
        Box::pin(async move { E::find_by_id(id).one(db).await })
    }

    fn update<'a, C>(db: &'a C, active_model: E::ActiveModel) -> RepoFuture<'a, E::Model>
    where
        C: ConnectionTrait,
    {
        Box::pin(async move { active_model.update(db).await })
    }

    /// Deletes by primary key and returns the number of rows removed.
    fn delete<'a, C>(
        db: &'a C,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> RepoFuture<'a, u64>
    where
        C: ConnectionTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Send + 'a,
    {
        Box::pin(async move {
            let res = E::delete_by_id(id).exec(db).await?;
            Ok(res.rows_affected)
        })
    }
}

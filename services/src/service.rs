use crate::error::ServiceResult;
use sea_orm::EntityTrait;

/// Converts a service-level command into the active model that persists it.
///
/// Validation and derived values (hashes, timestamps) belong here, so the
/// repository only ever sees rows that are ready to write.
pub trait ToActiveModel<E>
where
    E: EntityTrait,
{
    fn into_active_model(self) -> ServiceResult<E::ActiveModel>;
}

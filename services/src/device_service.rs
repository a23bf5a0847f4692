use crate::error::{ServiceError, ServiceResult, is_unique_violation};
use crate::service::ToActiveModel;
use crate::user_service::require_active;
use crate::validation;
use chrono::Utc;
use db::models::device_binding::{self, Model};
use db::repositories::{DeviceBindingRepository, Repository};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

#[derive(Debug, Clone)]
pub struct BindDevice {
    pub user_id: i64,
    pub device_id: String,
    pub device_name: String,
    pub device_model: String,
}

impl ToActiveModel<device_binding::Entity> for BindDevice {
    fn into_active_model(self) -> ServiceResult<device_binding::ActiveModel> {
        validation::non_blank("device_id", &self.device_id, validation::MAX_DEVICE_ID_LEN)?;
        validation::non_blank(
            "device_name",
            &self.device_name,
            validation::MAX_DEVICE_LABEL_LEN,
        )?;
        validation::non_blank(
            "device_model",
            &self.device_model,
            validation::MAX_DEVICE_LABEL_LEN,
        )?;

        Ok(device_binding::ActiveModel {
            device_id: Set(self.device_id.trim().to_string()),
            user_id: Set(self.user_id),
            device_name: Set(self.device_name.trim().to_string()),
            device_model: Set(self.device_model.trim().to_string()),
            bound_at: Set(Utc::now()),
            last_used_at: Set(None),
            unbound_at: Set(None),
            ..Default::default()
        })
    }
}

pub struct DeviceService {
    db: DatabaseConnection,
}

impl DeviceService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Binds a device to a user; the most recent bind wins.
    ///
    /// In one transaction: the device's previous binding ends, the user's
    /// previous binding ends, and the new binding is written. Ended rows are
    /// kept as history.
    pub async fn bind_device(&self, params: BindDevice) -> ServiceResult<Model> {
        let user_id = params.user_id;
        require_active(&self.db, user_id).await?;

        let device_id = params.device_id.trim().to_string();
        let am = params.into_active_model()?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        let previous = DeviceBindingRepository::find_active_by_device(&txn, &device_id).await?;
        DeviceBindingRepository::release_device(&txn, &device_id, now).await?;
        DeviceBindingRepository::release_user(&txn, user_id, now).await?;
        let binding = match DeviceBindingRepository::create(&txn, am).await {
            Ok(binding) => binding,
            Err(e) if is_unique_violation(&e) => {
                return Err(ServiceError::Conflict(format!(
                    "Device {device_id} was bound concurrently, retry"
                )));
            }
            Err(e) => return Err(e.into()),
        };
        txn.commit().await?;

        match previous {
            Some(prev) if prev.user_id != user_id => tracing::info!(
                device_id = %device_id,
                from_user = prev.user_id,
                to_user = user_id,
                "device rebound to another user"
            ),
            _ => tracing::info!(device_id = %device_id, user_id, "device bound"),
        }
        Ok(binding)
    }

    /// The live binding for a device.
    pub async fn get_device(&self, device_id: &str) -> ServiceResult<Model> {
        DeviceBindingRepository::find_active_by_device(&self.db, device_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Device {device_id} is not bound")))
    }

    /// Ends the caller's own live binding for `device_id`.
    pub async fn unbind_device(&self, device_id: &str, user_id: i64) -> ServiceResult<Model> {
        require_active(&self.db, user_id).await?;
        let binding = self.get_device(device_id).await?;
        if binding.user_id != user_id {
            return Err(ServiceError::Permission(
                "Device is bound to another user".into(),
            ));
        }
        let now = Utc::now();
        DeviceBindingRepository::release_device(&self.db, device_id, now).await?;
        tracing::info!(device_id, user_id, "device unbound");

        DeviceBindingRepository::find_by_id(&self.db, binding.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Device {device_id} is not bound")))
    }

    /// Binding history of a user, newest first.
    pub async fn list_devices(&self, user_id: i64) -> ServiceResult<Vec<Model>> {
        Ok(DeviceBindingRepository::list_for_user(&self.db, user_id).await?)
    }

    /// Whether `device_id` is currently bound to `user_id`.
    pub async fn verify_device(&self, device_id: &str, user_id: i64) -> ServiceResult<bool> {
        Ok(DeviceBindingRepository::find_active_by_device(&self.db, device_id)
            .await?
            .is_some_and(|b| b.user_id == user_id))
    }
}

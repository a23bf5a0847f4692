use crate::models::user::{Column, Entity, Model};
use crate::repositories::repository::Repository;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct UserRepository;

impl Repository<Entity> for UserRepository {}

impl UserRepository {
    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    pub async fn find_by_enrollment_number<C: ConnectionTrait>(
        db: &C,
        enrollment_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EnrollmentNumber.eq(enrollment_number))
            .one(db)
            .await
    }

    pub async fn find_by_employee_id<C: ConnectionTrait>(
        db: &C,
        employee_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .one(db)
            .await
    }
}

use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510190001_create_users::Migration),
            Box::new(migrations::m202510190002_create_device_bindings::Migration),
            Box::new(migrations::m202510190003_create_attendance::Migration),
        ]
    }
}

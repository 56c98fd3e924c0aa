//! SeaORM adapters. Functions here return `sea_orm::DbErr`; the repos layer
//! maps to `DomainError`.

pub mod recordings_sea;
pub mod users_sea;

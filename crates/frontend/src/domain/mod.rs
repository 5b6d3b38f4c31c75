pub mod a001_sector;
pub mod a002_position;
pub mod a003_stage;
pub mod a004_priority;
pub mod a005_client;
pub mod a006_employee;
pub mod a007_appointment;

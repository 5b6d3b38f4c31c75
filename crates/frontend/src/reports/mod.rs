pub mod r001_appointment_report;

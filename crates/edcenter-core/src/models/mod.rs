//! Data models for the educational center backend.
//!
//! This module contains the request and response types exchanged with
//! the backend API:
//!
//! - `User`, `AuthResponse`: account and token payloads
//! - `Student`, `Teacher`, `Class`, `Subject`, `Payment`: managed resources
//!   with their form payloads and list filters
//! - `DashboardStats`: aggregate figures for the overview screen
//! - `PaginatedResponse`, `Envelope`: response wrappers

pub mod class;
pub mod common;
pub mod dashboard;
pub mod payment;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

pub use class::{
    AvailableStudent, Class, ClassFilters, ClassFormData, ClassSchedule, ClassStatistics,
    ClassStats, ClassStatus, EnrollmentRequest,
};
pub use common::{Envelope, PageMeta, PaginatedResponse};
pub use dashboard::{DashboardStats, MonthlyRevenue, YearToDateStats};
pub use payment::{BulkPaymentRequest, MonthlyPayment, Payment, PaymentFilters, PaymentFormData};
pub use student::{
    ClassSummary, PaymentSummary, Student, StudentClassHistory, StudentFilters, StudentFormData,
    StudentPaymentHistory,
};
pub use subject::{Subject, SubjectFilters, SubjectFormData};
pub use teacher::{
    Teacher, TeacherFilters, TeacherFormData, TeacherPayment, TeacherStatistics, TeacherStats,
    TeacherStatus,
};
pub use user::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, User};

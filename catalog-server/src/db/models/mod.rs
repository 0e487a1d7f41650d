//! Database Models

pub mod booking;
pub mod customer;
pub mod product;
pub mod sent_list;
pub mod user;

pub use booking::{Booking, BookingSubmission, RegistrationStatus};
pub use customer::{MessageType, UnregisteredCustomer, UnregisteredCustomerCreate};
pub use product::{
    Product, ProductCreate, ProductDetail, ProductImage, ProductSummary, ProductUpdate,
    effective_name,
};
pub use sent_list::{SentList, SentListDetail, SentListWithUser};
pub use user::{User, UserCreate, UserPublic, UserRole};

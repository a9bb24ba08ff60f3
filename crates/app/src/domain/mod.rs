//! Promo Code Domain Concerns

pub mod partners;

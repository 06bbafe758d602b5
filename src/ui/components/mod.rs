//! Small reusable UI pieces

pub mod loading;

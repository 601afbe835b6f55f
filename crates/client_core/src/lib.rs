pub mod controller;
pub mod flow;
pub mod gateway;

pub use controller::{LoginController, LoginView};
pub use flow::{
    BackendCommand, Field, LoginEffect, LoginEvent, LoginFlow, LoginStep, PageEntry, ViewEffect,
};
pub use gateway::{AuthGateway, GatewayError, HttpAuthGateway};

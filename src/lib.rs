//! Storefront - a small e-commerce REST backend.
//!
//! Users register and log in to obtain a signed session token; product
//! endpoints sit behind a bearer-token gate.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    login, register, Claims, CredentialHasher, HashCost, LoginError, PasswordError,
    RegistrationError, RegistrationRequest, TokenError, TokenService,
};
pub use config::Config;
pub use db::{
    Database, NewProduct, NewUser, Product, ProductRepository, ProductStore, ProductUpdate, User,
    UserRepository, UserStore,
};
pub use error::{Result, StorefrontError};

pub mod connection;
pub mod dao;
pub mod entities;
pub mod memory;
pub mod providers;
pub mod repository;

//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod audio;
pub mod boss;
pub mod collision;
pub mod components;
pub mod debug;
pub mod enemy;
pub mod health;
pub mod hitbox;
pub mod input;
pub mod item;
pub mod lifetime;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod render;
pub mod state;

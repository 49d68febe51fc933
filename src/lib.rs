//! JunkStop - Habit Accountability Backend
//!
//! Users log junk-food incidents, build abstinence streaks and post to a
//! community feed. Every state change is fed to the gamification core, which
//! unlocks achievements exactly once and credits XP toward levels.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

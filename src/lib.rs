//! Comment Guesser game backend.
//!
//! Fetches YouTube Shorts and their comments, turns them into one-shot
//! rounds (pick the top comment, or rank five comments by likes) and scores
//! submissions over a small JSON API.

pub mod config;
pub mod constants;
pub mod game;
pub mod theme;
pub mod web;
pub mod youtube;

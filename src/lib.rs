// Operations dashboard - status classification, weekly aggregates and chart shaping
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

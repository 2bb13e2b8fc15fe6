//! Support library for a legacy CGI-era web application.
//!
//! # Architecture Overview
//!
//! ```text
//!                ┌─────────────────────────────────────────────────┐
//!                │                  WEB SUPPORT                    │
//!                │                                                 │
//!  remote page   │  ┌─────────┐         ┌───────────────────┐     │
//!  ◀─────────────┼─▶│  fetch  │◀────────│  webshare (sync)  │     │
//!                │  └─────────┘         └─────────┬─────────┘     │
//!                │                                │               │
//!                │                                ▼               │
//!                │                      ┌───────────────────┐     │
//!                │                      │ shared components │     │
//!                │                      │  (rcd registry)   │     │
//!                │                      └───────────────────┘     │
//!                │                                                 │
//!                │  ┌───────────────────────────────────────────┐  │
//!                │  │              Page Production              │  │
//!                │  │  ┌────────┐  ┌──────────┐  ┌───────────┐  │  │
//!                │  │  │ markup │  │ template │  │ errorpage │  │  │
//!                │  │  └────────┘  └──────────┘  └───────────┘  │  │
//!                │  └───────────────────────────────────────────┘  │
//!                │                                                 │
//!                │  ┌──────────┐   ┌──────────┐   ┌───────────┐   │
//!                │  │  forms   │   │ filedrop │   │  config   │   │
//!                │  └──────────┘   └──────────┘   └───────────┘   │
//!                └─────────────────────────────────────────────────┘
//! ```

// Network-facing subsystems
pub mod fetch;
pub mod webshare;

// Page production
pub mod errorpage;
pub mod markup;
pub mod template;

// Request-side helpers
pub mod forms;

// Publishing
pub mod filedrop;

// Cross-cutting concerns
pub mod config;

pub use config::SiteConfig;
pub use fetch::{get_url, PageFetcher};
pub use filedrop::DropBox;
pub use template::Page;
pub use webshare::SharedComponents;

//! Cross-component tests
//!
//! Exercise the resolver, controller and simulator together through the
//! scene graph and the headless UI.

mod picking_integration;

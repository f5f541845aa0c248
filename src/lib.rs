//! MTO: insulation cladding material takeoff
//!
//! Estimates cladding area, sealant bead and bonding quantities, and their
//! cost, from the extracted text of piping fabrication drawings.

pub mod cli;
pub mod core;
pub mod entities;
pub mod logging;

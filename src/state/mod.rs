//! Client-side state models.
//!
//! DESIGN
//! ======
//! Each enhancement keeps its state in a plain struct with no browser types,
//! so transitions are tested natively and the DOM is only ever a projection.

pub mod carousel;
pub mod collapse;
pub mod toast;

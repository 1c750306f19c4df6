//! DTOs handed from the list services to the rendering layer.

pub mod list_view;

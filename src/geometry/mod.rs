pub mod hit_testing;

pub use hit_testing::{point_in_rotated_rect, rotate_point, rotated_corners};

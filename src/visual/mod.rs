mod mapper;

pub use mapper::{
    animation_period_secs, map_profile_to_visual, AuraShape, Extent, Hue, RingOverlay, SizeClass,
    SizeScale, VisualParams,
};

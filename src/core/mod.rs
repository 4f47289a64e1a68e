pub mod moa;
pub mod playback;
pub mod trajectory;
pub mod window;

pub mod assets;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod physics;
pub mod scene;

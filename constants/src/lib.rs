/// Fixed numbers shared by the impostor baking pipeline and its tooling
pub mod capture;
pub mod texture;

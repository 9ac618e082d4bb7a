// Adapters layer: HTTP implementations of the vacancy source port.

pub mod headhunter;
pub mod http;
pub mod superjob;

pub use headhunter::{HeadHunterClient, HeadHunterSettings};
pub use superjob::{SuperJobClient, SuperJobSettings};

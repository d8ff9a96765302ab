mod battery;
mod display;
mod engine;
mod selector;

mod command;
mod pacing;

/// Git adapters for obtaining repository checkouts
mod git_cloner;

pub use git_cloner::GitCloner;

mod common;
mod explain;
mod ranking;
mod service;

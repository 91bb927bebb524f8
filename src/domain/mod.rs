// Printer domain:
// - Job entity and the queue contract it travels through.
// - The worker that drains the queue, and the power flag that stops it.
// - Events the worker publishes while it prints.

pub mod entity;
pub mod event;
pub mod power;
pub mod printer;
pub mod repository;

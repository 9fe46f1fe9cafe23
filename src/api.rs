pub mod esolar;

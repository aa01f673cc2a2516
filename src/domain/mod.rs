pub mod catalog;
pub mod optimizer;
pub mod program;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod table;
pub mod validate;

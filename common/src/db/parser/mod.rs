pub mod wires;

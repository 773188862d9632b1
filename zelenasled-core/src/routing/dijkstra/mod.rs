mod masked_dijkstra;
mod state;

pub use masked_dijkstra::{SearchMask, shortest_path};

pub mod network_link;
pub mod resource_node;
pub mod resource_store;
pub mod resource_vector;

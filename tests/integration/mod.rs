mod basic_integration;
mod reflection_flow;
mod store_properties;

/// Generates `new(store)` for clients whose only state is the store handle.
macro_rules! impl_client_new {
    ($client_name:ident) => {
        impl $client_name {
            pub fn new(store: crate::actor_framework::StoreClient) -> Self {
                Self { store }
            }
        }
    };
}

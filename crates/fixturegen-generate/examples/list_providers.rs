use fixturegen_generate::ProviderRegistry;

fn main() {
    let registry = ProviderRegistry::with_defaults();
    for id in registry.ids() {
        println!("{id}");
    }
}

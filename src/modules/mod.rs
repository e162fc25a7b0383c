pub mod authors;
pub mod books;

use library_kernel::ModuleRegistry;

use crate::library::Library;

/// Register all record modules with the registry, in dependency order
pub fn register_all(registry: &mut ModuleRegistry, library: &Library) {
    registry.register(authors::create_module(library.author_repository()));
    registry.register(books::create_module(
        library.book_repository(),
        library.delete_policy(),
    ));
}

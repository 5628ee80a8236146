// src/db/id_allocator.rs

/// Sequência de IDs por tipo de entidade: 1, 2, 3...
/// Nunca devolve um valor já emitido. Não é thread-safe por si só;
/// o `MemStorage` só chama `next()` com o lock de escrita na mão.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: i32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> i32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Último ID emitido (0 se nenhum).
    pub fn last_issued(&self) -> i32 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

//! Last-in-first-out container for constructs that are still open
//!
//! The walker keeps one [`Stack`] per construct kind. Popping or peeking an
//! empty stack yields `None`; handlers routinely peek stacks that may not be
//! in scope.

/// Generic LIFO stack
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push a value onto the top of the stack
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the top value
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrow the top value
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Mutably borrow the top value
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Number of values on the stack
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds no values
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate from the top of the stack down to the bottom
    pub fn iter_top_down(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.peek(), Some(&1));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_empty_stack_is_safe() {
        let mut stack: Stack<String> = Stack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
        assert!(stack.peek_mut().is_none());
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_peek_mut_updates_top() {
        let mut stack = Stack::new();
        stack.push(String::from("a"));
        stack.push(String::from("b"));
        if let Some(top) = stack.peek_mut() {
            top.push('!');
        }
        assert_eq!(stack.pop().as_deref(), Some("b!"));
    }

    #[test]
    fn test_iter_top_down() {
        let mut stack = Stack::new();
        stack.push('a');
        stack.push('b');
        let order: Vec<char> = stack.iter_top_down().copied().collect();
        assert_eq!(order, vec!['b', 'a']);
    }
}

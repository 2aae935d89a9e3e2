use crate::constants::STACK_DEPTH;
use crate::error::EngineFault;

/// # Call Stack
/// Holds the return addresses of up to `STACK_DEPTH` nested subroutine calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Pushes a return address; `pc` only tags the fault if the stack is full
    pub fn push(&mut self, addr: u16, pc: u16) -> Result<(), EngineFault> {
        if self.sp == STACK_DEPTH {
            return Err(EngineFault::StackOverflow { pc });
        }
        self.frames[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address; `pc` only tags the fault if the stack is empty
    pub fn pop(&mut self, pc: u16) -> Result<u16, EngineFault> {
        if self.sp == 0 {
            return Err(EngineFault::StackUnderflow { pc });
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Live return addresses, oldest first
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.sp]
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_stack {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x202, 0x200).unwrap();
        stack.push(0x304, 0x302).unwrap();
        assert_eq!(stack.frames(), &[0x202, 0x304]);
        assert_eq!(stack.pop(0x400), Ok(0x304));
        assert_eq!(stack.pop(0x306), Ok(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(
            stack.pop(0x202),
            Err(EngineFault::StackUnderflow { pc: 0x202 })
        );
    }

    #[test]
    fn test_push_full_overflows() {
        let mut stack = Stack::new();
        for addr in 0..STACK_DEPTH as u16 {
            stack.push(addr, 0x200).unwrap();
        }
        assert_eq!(
            stack.push(0xABC, 0x200),
            Err(EngineFault::StackOverflow { pc: 0x200 })
        );
        assert_eq!(stack.depth(), STACK_DEPTH);
        assert_eq!(stack.frames()[STACK_DEPTH - 1], 0xF);
    }
}

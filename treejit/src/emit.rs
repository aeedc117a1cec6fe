use asm::Assembler;
use emu::Procedure;

/// Code generation backend for a procedure of one `i32` argument.
///
/// Labels may be branched to before they are placed. Nothing is checked
/// until [`Emitter::finalize`], except that a label is placed at most once.
pub trait Emitter {
    type Label: Copy;
    type Value: Copy;
    type Cond: Copy;
    type Output;
    type Error;

    fn param(&mut self) -> Self::Value;
    fn new_label(&mut self) -> Self::Label;
    fn place(&mut self, label: Self::Label) -> Result<(), Self::Error>;
    fn constant(&mut self, value: i32) -> Self::Value;
    fn ret(&mut self, value: Self::Value);
    fn gt(&mut self, a: Self::Value, b: Self::Value) -> Self::Cond;
    fn eq(&mut self, a: Self::Value, b: Self::Value) -> Self::Cond;
    fn branch_if(&mut self, cond: Self::Cond, label: Self::Label);
    fn branch_if_not(&mut self, cond: Self::Cond, label: Self::Label);
    fn branch(&mut self, label: Self::Label);
    fn nop(&mut self);
    /// Move the code placed from `from` up to `to` to the start.
    fn move_blocks_to_start(
        &mut self,
        from: Self::Label,
        to: Self::Label,
    ) -> Result<(), Self::Error>;
    fn finalize(self) -> Result<Self::Output, Self::Error>;
}

impl Emitter for Assembler {
    type Label = asm::Label;
    type Value = asm::Value;
    type Cond = asm::Cond;
    type Output = Procedure;
    type Error = asm::Error;

    fn param(&mut self) -> asm::Value {
        Assembler::param(self)
    }
    fn new_label(&mut self) -> asm::Label {
        Assembler::new_label(self)
    }
    fn place(&mut self, label: asm::Label) -> Result<(), asm::Error> {
        Assembler::place(self, label)
    }
    fn constant(&mut self, value: i32) -> asm::Value {
        Assembler::constant(self, value)
    }
    fn ret(&mut self, value: asm::Value) {
        Assembler::ret(self, value)
    }
    fn gt(&mut self, a: asm::Value, b: asm::Value) -> asm::Cond {
        Assembler::gt(self, a, b)
    }
    fn eq(&mut self, a: asm::Value, b: asm::Value) -> asm::Cond {
        Assembler::eq(self, a, b)
    }
    fn branch_if(&mut self, cond: asm::Cond, label: asm::Label) {
        Assembler::branch_if(self, cond, label)
    }
    fn branch_if_not(&mut self, cond: asm::Cond, label: asm::Label) {
        Assembler::branch_if_not(self, cond, label)
    }
    fn branch(&mut self, label: asm::Label) {
        Assembler::branch(self, label)
    }
    fn nop(&mut self) {
        Assembler::nop(self)
    }
    fn move_blocks_to_start(&mut self, from: asm::Label, to: asm::Label) -> Result<(), asm::Error> {
        Assembler::move_blocks_to_start(self, from, to)
    }
    fn finalize(self) -> Result<Procedure, asm::Error> {
        Assembler::finalize(self).map(Procedure::new)
    }
}

//! Property tests for the cart quantity engine.

use proptest::prelude::*;

use upline::{
    cart::Cart,
    products::{Product, ProductId},
    store::MemoryStore,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(u64),
    Decrement(u64),
    Remove(u64),
}

fn product(id: u64) -> Product {
    Product::new(id, format!("Product {id}"), id * 250)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1_u64..6).prop_map(Op::Add),
        2 => (1_u64..6).prop_map(Op::Decrement),
        1 => (1_u64..6).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn quantities_stay_positive_and_totals_add_up(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut cart = Cart::load(MemoryStore::new())?;

        for op in ops {
            match op {
                Op::Add(id) => cart.add_or_increment(product(id))?,
                Op::Decrement(id) => cart.decrement(ProductId(id))?,
                Op::Remove(id) => cart.remove(ProductId(id))?,
            };

            prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));

            let expected: u64 = cart
                .lines()
                .iter()
                .map(|line| line.product.price * u64::from(line.quantity))
                .sum();

            prop_assert_eq!(cart.total(), expected);
        }

        let reloaded = Cart::load(cart.store().clone())?;

        prop_assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn increment_touches_only_its_own_line(
        ops in prop::collection::vec(arb_op(), 0..32),
        id in 1_u64..6,
    ) {
        let mut cart = Cart::load(MemoryStore::new())?;

        for op in ops {
            match op {
                Op::Add(id) => cart.add_or_increment(product(id))?,
                Op::Decrement(id) => cart.decrement(ProductId(id))?,
                Op::Remove(id) => cart.remove(ProductId(id))?,
            };
        }

        let before = cart.lines().to_vec();
        let quantity = cart.get(ProductId(id)).map_or(0, |line| line.quantity);

        cart.add_or_increment(product(id))?;

        prop_assert_eq!(
            cart.get(ProductId(id)).map(|line| line.quantity),
            Some(quantity + 1)
        );

        for line in before.iter().filter(|line| line.product.id != ProductId(id)) {
            prop_assert_eq!(cart.get(line.product.id), Some(line));
        }
    }
}

use cosmwasm_std::Uint128;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    msg::ExecuteMsg,
    tests::{
        e2e::test_env::{Side, TestEnv},
        test_constants::{BASE_DENOM, QUOTE_DENOM},
    },
};

const SELLERS: [&str; 3] = ["alice", "erin", "frank"];
const BUYERS: [&str; 3] = ["bob", "carol", "dave"];

/// Custody must back every claim across both chains, exactly:
/// - marscoin escrowed on mars backs the resting asks and the vouchers
///   circulating on venus
/// - venuscoin escrowed on venus backs the resting bids and the vouchers
///   circulating on mars
fn assert_conservation(env: &TestEnv, label: &str) {
    let marscoin_voucher = env.voucher_from(Side::Mars, BASE_DENOM);
    let venuscoin_voucher = env.voucher_from(Side::Venus, QUOTE_DENOM);

    let asks = env.mars.sell_book(BASE_DENOM, QUOTE_DENOM);
    let marscoin_supply = env.venus.voucher_supply(&marscoin_voucher);
    assert_eq!(
        env.mars.escrow(BASE_DENOM),
        Uint128::from(asks.book.total_amount() as u128) + marscoin_supply,
        "{label}"
    );

    let bids = env.venus.buy_book(BASE_DENOM, QUOTE_DENOM);
    let bid_value: u128 = bids
        .book
        .orders
        .iter()
        .map(|o| (o.amount * o.price) as u128)
        .sum();
    let venuscoin_supply = env.mars.voucher_supply(&venuscoin_voucher);
    assert_eq!(
        env.venus.escrow(QUOTE_DENOM),
        Uint128::from(bid_value) + venuscoin_supply,
        "{label}"
    );

    // Every minted voucher reached a user
    assert_eq!(
        env.venus
            .total_balance(&env.venus.bank_denom(&marscoin_voucher)),
        marscoin_supply.u128(),
        "{label}"
    );
    assert_eq!(
        env.mars
            .total_balance(&env.mars.bank_denom(&venuscoin_voucher)),
        venuscoin_supply.u128(),
        "{label}"
    );

    // Books stay sorted with their best price on top
    assert!(
        asks.book.orders.windows(2).all(|w| w[0].price >= w[1].price),
        "{label}"
    );
    assert!(
        bids.book.orders.windows(2).all(|w| w[0].price <= w[1].price),
        "{label}"
    );
}

fn cancel_random_order(env: &mut TestEnv, rng: &mut StdRng, side: Side) {
    let orders = match side {
        Side::Mars => env.mars.sell_book(BASE_DENOM, QUOTE_DENOM).book.orders,
        Side::Venus => env.venus.buy_book(BASE_DENOM, QUOTE_DENOM).book.orders,
    };
    let Some(order) = orders.choose(rng) else {
        return;
    };

    let chain = env.chain_mut(side);
    let channel_id = chain.channel_id();
    let base_denom = BASE_DENOM.to_string();
    let quote_denom = QUOTE_DENOM.to_string();
    let msg = match side {
        Side::Mars => ExecuteMsg::CancelSellOrder {
            channel_id,
            base_denom,
            quote_denom,
            order_id: order.id,
        },
        Side::Venus => ExecuteMsg::CancelBuyOrder {
            channel_id,
            base_denom,
            quote_denom,
            order_id: order.id,
        },
    };
    chain.execute(&order.creator, &[], msg).unwrap();
}

#[test]
fn test_cross_chain_fuzz() {
    let seed: u64 = 987654321;
    let rounds = 150;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut env = TestEnv::new();

    for round in 0..rounds {
        let label = format!("round {round}");
        match rng.gen_range(0..10) {
            0..=3 => {
                let seller = SELLERS.choose(&mut rng).unwrap();
                env.sell(
                    Side::Mars,
                    seller,
                    rng.gen_range(1..50),
                    rng.gen_range(1..30),
                );
            }
            4..=7 => {
                let buyer = BUYERS.choose(&mut rng).unwrap();
                env.buy(
                    Side::Venus,
                    buyer,
                    rng.gen_range(1..50),
                    rng.gen_range(1..30),
                );
            }
            8 => cancel_random_order(&mut env, &mut rng, Side::Mars),
            _ => cancel_random_order(&mut env, &mut rng, Side::Venus),
        }
        assert_conservation(&env, &label);
    }
}

use cosmwasm_std::{attr, Coin, Uint128};

use crate::{
    msg::ExecuteMsg,
    tests::{
        e2e::test_env::{Side, TestEnv, MARS_PORT, VENUS_PORT},
        test_constants::{BASE_DENOM, QUOTE_DENOM},
        test_utils::parse_ack,
    },
    types::{BuyOrderPacketAck, Order, SellOrderPacketAck},
};

#[test]
fn test_sell_order_matches_remote_bids() {
    let mut env = TestEnv::new();

    // Both bids find an empty book on mars and rest on venus
    for (buyer, amount, price) in [("bob", 5, 10), ("carol", 3, 12)] {
        let relayed = env.buy(Side::Venus, buyer, amount, price);
        let ack: BuyOrderPacketAck = parse_ack(&relayed.receive.acknowledgement).unwrap();
        assert_eq!(
            ack,
            BuyOrderPacketAck {
                remaining_amount: amount,
                purchase: 0,
                spent: 0,
            }
        );
    }
    assert_eq!(env.venus.escrow(QUOTE_DENOM), Uint128::new(86));

    let relayed = env.sell(Side::Mars, "alice", 6, 9);
    assert_eq!(relayed.packet.src.port_id, MARS_PORT);
    assert_eq!(relayed.packet.dest.port_id, VENUS_PORT);
    let ack: SellOrderPacketAck = parse_ack(&relayed.receive.acknowledgement).unwrap();
    assert_eq!(
        ack,
        SellOrderPacketAck {
            remaining_amount: 0,
            gain: 66,
        }
    );

    // Carol's better bid is consumed first, bob keeps the rest of his
    let bids = env.venus.buy_book(BASE_DENOM, QUOTE_DENOM);
    assert_eq!(bids.book.orders, vec![Order::new(0, "bob", 2, 10)]);
    assert!(env.mars.sell_book(BASE_DENOM, QUOTE_DENOM).book.is_empty());

    // Buyers hold vouchers for the escrowed marscoin
    let marscoin_voucher = env.voucher_from(Side::Mars, BASE_DENOM);
    let marscoin_bank_denom = env.venus.bank_denom(&marscoin_voucher);
    assert_eq!(env.venus.balance("carol", &marscoin_bank_denom), 3);
    assert_eq!(env.venus.balance("bob", &marscoin_bank_denom), 3);
    assert_eq!(env.venus.voucher_supply(&marscoin_voucher), Uint128::new(6));
    assert_eq!(env.mars.escrow(BASE_DENOM), Uint128::new(6));

    // Alice holds vouchers for the escrowed venuscoin
    let venuscoin_voucher = env.voucher_from(Side::Venus, QUOTE_DENOM);
    let venuscoin_bank_denom = env.mars.bank_denom(&venuscoin_voucher);
    assert_eq!(env.mars.balance("alice", &venuscoin_bank_denom), 66);
    assert_eq!(env.mars.voucher_supply(&venuscoin_voucher), Uint128::new(66));

    // Bob withdraws what is left of his bid
    let channel_id = env.venus.channel_id();
    env.venus
        .execute(
            "bob",
            &[],
            ExecuteMsg::CancelBuyOrder {
                channel_id,
                base_denom: BASE_DENOM.to_string(),
                quote_denom: QUOTE_DENOM.to_string(),
                order_id: 0,
            },
        )
        .unwrap();
    assert_eq!(env.venus.balance("bob", QUOTE_DENOM), 20);
    assert_eq!(env.venus.escrow(QUOTE_DENOM), Uint128::new(66));
    assert!(env.venus.buy_book(BASE_DENOM, QUOTE_DENOM).book.is_empty());
}

#[test]
fn test_buy_order_matches_resting_sell() {
    let mut env = TestEnv::new();

    let relayed = env.sell(Side::Mars, "alice", 10, 9);
    let ack: SellOrderPacketAck = parse_ack(&relayed.receive.acknowledgement).unwrap();
    assert_eq!(
        ack,
        SellOrderPacketAck {
            remaining_amount: 10,
            gain: 0,
        }
    );
    let asks = env.mars.sell_book(BASE_DENOM, QUOTE_DENOM);
    assert_eq!(asks.book.orders, vec![Order::new(0, "alice", 10, 9)]);
    assert!(relayed.ack.attributes.contains(&attr("order_id", "0")));

    let relayed = env.buy(Side::Venus, "dave", 4, 11);
    let ack: BuyOrderPacketAck = parse_ack(&relayed.receive.acknowledgement).unwrap();
    assert_eq!(
        ack,
        BuyOrderPacketAck {
            remaining_amount: 0,
            purchase: 4,
            spent: 36,
        }
    );

    // Alice is paid at her ask, dave receives the base he bought
    let venuscoin_voucher = env.voucher_from(Side::Venus, QUOTE_DENOM);
    assert_eq!(
        env.mars
            .balance("alice", &env.mars.bank_denom(&venuscoin_voucher)),
        36
    );
    let marscoin_voucher = env.voucher_from(Side::Mars, BASE_DENOM);
    assert_eq!(
        env.venus
            .balance("dave", &env.venus.bank_denom(&marscoin_voucher)),
        4
    );

    let asks = env.mars.sell_book(BASE_DENOM, QUOTE_DENOM);
    assert_eq!(asks.book.orders, vec![Order::new(0, "alice", 6, 9)]);
    assert!(env.venus.buy_book(BASE_DENOM, QUOTE_DENOM).book.is_empty());

    // Dave paid 44 up front and gets back what alice's lower ask saved him
    assert_eq!(env.venus.balance("dave", QUOTE_DENOM), 8);
    assert_eq!(env.venus.escrow(QUOTE_DENOM), Uint128::new(36));
    assert_eq!(env.mars.voucher_supply(&venuscoin_voucher), Uint128::new(36));
    assert_eq!(env.mars.escrow(BASE_DENOM), Uint128::new(10));
    assert_eq!(env.venus.voucher_supply(&marscoin_voucher), Uint128::new(4));
}

#[test]
fn test_vouchers_unwind_to_original() {
    let mut env = TestEnv::new();
    env.buy(Side::Venus, "carol", 3, 12);
    env.sell(Side::Mars, "alice", 3, 12);

    let marscoin_voucher = env.voucher_from(Side::Mars, BASE_DENOM);
    assert_eq!(env.venus.voucher_supply(&marscoin_voucher), Uint128::new(3));
    assert_eq!(env.mars.escrow(BASE_DENOM), Uint128::new(3));

    // A market for the voucher itself, bid on mars
    env.mars.create_pair(&marscoin_voucher, QUOTE_DENOM);
    env.venus.create_pair(&marscoin_voucher, QUOTE_DENOM);
    env.place_order(Side::Mars, "erin", false, &marscoin_voucher, QUOTE_DENOM, 3, 2);
    let bids = env.mars.buy_book(&marscoin_voucher, QUOTE_DENOM);
    assert_eq!(bids.book.orders, vec![Order::new(0, "erin", 3, 2)]);

    // Carol sells her vouchers back, erin receives the escrowed marscoin
    let relayed = env.place_order(Side::Venus, "carol", true, &marscoin_voucher, QUOTE_DENOM, 3, 1);
    let ack: SellOrderPacketAck = parse_ack(&relayed.receive.acknowledgement).unwrap();
    assert_eq!(
        ack,
        SellOrderPacketAck {
            remaining_amount: 0,
            gain: 6,
        }
    );

    assert_eq!(env.mars.balance("erin", BASE_DENOM), 3);
    assert_eq!(env.mars.escrow(BASE_DENOM), Uint128::zero());
    assert_eq!(env.venus.voucher_supply(&marscoin_voucher), Uint128::zero());
    assert!(env.mars.buy_book(&marscoin_voucher, QUOTE_DENOM).book.is_empty());
}

#[test]
fn test_unknown_pair_refunds_sender() {
    let mut env = TestEnv::new();
    env.mars.create_pair(BASE_DENOM, "jupitercoin");

    let relayed = env.place_order(Side::Mars, "alice", true, BASE_DENOM, "jupitercoin", 5, 9);

    assert!(parse_ack::<SellOrderPacketAck>(&relayed.receive.acknowledgement).is_err());
    assert!(relayed.ack.attributes.contains(&attr("outcome", "error")));
    assert_eq!(env.mars.balance("alice", BASE_DENOM), 5);
    assert_eq!(env.mars.escrow(BASE_DENOM), Uint128::zero());
    assert!(env.mars.sell_book(BASE_DENOM, "jupitercoin").book.is_empty());
}

#[test]
fn test_timeout_refunds_sender() {
    let mut env = TestEnv::new();
    let channel_id = env.venus.channel_id();

    let res = env
        .venus
        .execute(
            "bob",
            &[Coin::new(50, QUOTE_DENOM)],
            ExecuteMsg::SendBuyOrder {
                channel_id,
                base_denom: BASE_DENOM.to_string(),
                quote_denom: QUOTE_DENOM.to_string(),
                amount: 5,
                price: 10,
                timeout_seconds: Some(30),
            },
        )
        .unwrap();
    assert_eq!(env.venus.escrow(QUOTE_DENOM), Uint128::new(50));

    let responses = env.time_out(Side::Venus, &res);

    assert_eq!(responses.len(), 1);
    assert!(responses[0]
        .attributes
        .contains(&attr("method", "onTimeoutBuyOrder")));
    assert_eq!(env.venus.balance("bob", QUOTE_DENOM), 50);
    assert_eq!(env.venus.escrow(QUOTE_DENOM), Uint128::zero());
    assert!(env.venus.buy_book(BASE_DENOM, QUOTE_DENOM).book.is_empty());
    assert!(env.mars.sell_book(BASE_DENOM, QUOTE_DENOM).book.is_empty());
}

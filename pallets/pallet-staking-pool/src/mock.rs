// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

//! Test utilities

use frame_support::{
	assert_ok, parameter_types,
	traits::{fungible::Mutate, tokens::Preservation, ConstU32, ConstU64, Time},
	weights::constants::RocksDbWeight,
	PalletId,
};
use sp_runtime::{
	traits::{BlakeTwo256, IdentifyAccount, IdentityLookup, Verify},
	BuildStorage, MultiSignature,
};

use crate::{
	self as pallet_staking_pool,
	traits::{RewardVault, VaultError},
};

pub(crate) type Balance = u128;
pub(crate) type Moment = u64;
pub(crate) type Hash = sp_core::H256;
pub(crate) type Signature = MultiSignature;
pub(crate) type AccountPublic = <Signature as Verify>::Signer;
pub(crate) type AccountId = <AccountPublic as IdentifyAccount>::AccountId;

pub(crate) type Block = frame_system::mocking::MockBlock<Test>;

// accounts
pub(crate) const ACCOUNT_00: AccountId = AccountId::new([0u8; 32]);
pub(crate) const ACCOUNT_01: AccountId = AccountId::new([1u8; 32]);
pub(crate) const ACCOUNT_02: AccountId = AccountId::new([2u8; 32]);
/// The account backing the mock reward vault's payouts.
pub(crate) const VAULT_ACCOUNT: AccountId = AccountId::new([u8::MAX; 32]);
pub(crate) const VAULT_FUNDS: Balance = 10u128.pow(18);

/// Both cooldowns are configured equal, matching the reference deployment.
pub(crate) const COOLDOWN: Moment = 100;

frame_support::construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		Balances: pallet_balances,
		Timestamp: pallet_timestamp,
		StakingPool: crate,
	}
);

parameter_types! {
	pub const SS58Prefix: u8 = 38;
	pub const BlockHashCount: u64 = 250;
}

impl frame_system::Config for Test {
	type AccountData = pallet_balances::AccountData<Balance>;
	type AccountId = AccountId;
	type BaseCallFilter = frame_support::traits::Everything;
	type Block = Block;
	type BlockHashCount = BlockHashCount;
	type BlockLength = ();
	type BlockWeights = ();
	type DbWeight = RocksDbWeight;
	type Hash = Hash;
	type Hashing = BlakeTwo256;
	type Lookup = IdentityLookup<Self::AccountId>;
	type MaxConsumers = ConstU32<16>;
	type MultiBlockMigrator = ();
	type Nonce = u64;
	type OnKilledAccount = ();
	type OnNewAccount = ();
	type OnSetCode = ();
	type PalletInfo = PalletInfo;
	type PostInherents = ();
	type PostTransactions = ();
	type PreInherents = ();
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type RuntimeOrigin = RuntimeOrigin;
	type RuntimeTask = ();
	type SS58Prefix = SS58Prefix;
	type SingleBlockMigrations = ();
	type SystemWeightInfo = ();
	type Version = ();
}

parameter_types! {
	pub const ExistentialDeposit: Balance = 1;
	pub const MaxLocks: u32 = 50;
	pub const MaxReserves: u32 = 50;
}

impl pallet_balances::Config for Test {
	type AccountStore = System;
	type Balance = Balance;
	type DustRemoval = ();
	type ExistentialDeposit = ExistentialDeposit;
	type FreezeIdentifier = ();
	type MaxFreezes = ();
	type MaxLocks = MaxLocks;
	type MaxReserves = MaxReserves;
	type ReserveIdentifier = [u8; 8];
	type RuntimeEvent = RuntimeEvent;
	type RuntimeFreezeReason = ();
	type RuntimeHoldReason = ();
	type WeightInfo = ();
}

impl pallet_timestamp::Config for Test {
	type MinimumPeriod = ConstU64<1>;
	type Moment = Moment;
	type OnTimestampSet = ();
	type WeightInfo = ();
}

parameter_types! {
	pub const MinWithdrawDelay: Moment = COOLDOWN;
	pub const MinClaimDelay: Moment = COOLDOWN;
	pub const StakingPoolId: PalletId = PalletId(*b"stkgpool");

	// Mock reward vault state, settable from tests.
	pub static VaultIncome: Balance = 0;
	pub static VaultUnavailable: bool = false;
	pub static VaultPayoutFails: bool = false;
}

/// A reward vault whose reported income and failure modes are controlled by
/// the test, paying out of [`VAULT_ACCOUNT`].
pub struct MockRewardVault;

impl RewardVault<AccountId, Balance> for MockRewardVault {
	fn total_available() -> Result<Balance, VaultError> {
		if VaultUnavailable::get() {
			return Err(VaultError::Unavailable);
		}
		Ok(VaultIncome::get())
	}

	fn payout(beneficiary: &AccountId, amount: Balance) -> Result<(), VaultError> {
		if VaultPayoutFails::get() {
			return Err(VaultError::PayoutFailed);
		}
		<Balances as Mutate<AccountId>>::transfer(&VAULT_ACCOUNT, beneficiary, amount, Preservation::Expendable)
			.map(|_| ())
			.map_err(|_| VaultError::PayoutFailed)
	}
}

impl pallet_staking_pool::Config for Test {
	type Clock = Timestamp;
	type Currency = Balances;
	type MinClaimDelay = MinClaimDelay;
	type MinWithdrawDelay = MinWithdrawDelay;
	type PalletId = StakingPoolId;
	type RewardVault = MockRewardVault;
	type RuntimeEvent = RuntimeEvent;
	type WeightInfo = ();
}

pub(crate) fn events() -> Vec<crate::Event<Test>> {
	System::events()
		.into_iter()
		.map(|r| r.event)
		.filter_map(|e| {
			if let RuntimeEvent::StakingPool(inner) = e {
				Some(inner)
			} else {
				None
			}
		})
		.collect::<Vec<_>>()
}

/// Moves the clock forward by `delta` in a new block.
pub(crate) fn advance_time(delta: Moment) {
	System::set_block_number(System::block_number() + 1);
	pallet_timestamp::Pallet::<Test>::set_timestamp(Timestamp::now() + delta);
}

#[derive(Clone, Default)]
pub(crate) struct ExtBuilder {
	balances: Vec<(AccountId, Balance)>,
	// [staker, amount]; staked at genesis time zero
	stakers: Vec<(AccountId, Balance)>,
	vault_income: Balance,
}

impl ExtBuilder {
	pub(crate) fn with_balances(mut self, balances: Vec<(AccountId, Balance)>) -> Self {
		self.balances = balances;
		self
	}

	pub(crate) fn with_stakers(mut self, stakers: Vec<(AccountId, Balance)>) -> Self {
		self.stakers = stakers;
		self
	}

	pub(crate) fn with_vault_income(mut self, vault_income: Balance) -> Self {
		self.vault_income = vault_income;
		self
	}

	pub(crate) fn build(self) -> sp_io::TestExternalities {
		let mut storage = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

		let mut balances = self.balances.clone();
		balances.push((VAULT_ACCOUNT, VAULT_FUNDS));
		pallet_balances::GenesisConfig::<Test> { balances }
			.assimilate_storage(&mut storage)
			.expect("assimilate should not fail");

		let mut ext = sp_io::TestExternalities::new(storage);

		ext.execute_with(|| {
			System::set_block_number(1);

			VaultIncome::set(self.vault_income);
			VaultUnavailable::set(false);
			VaultPayoutFails::set(false);

			for (staker, amount) in self.stakers.clone() {
				assert_ok!(StakingPool::stake(RuntimeOrigin::signed(staker), amount));
			}
		});

		ext
	}

	pub(crate) fn build_and_execute_with_sanity_tests(self, test: impl FnOnce()) {
		self.build().execute_with(|| {
			test();
			crate::try_state::do_try_state::<Test>().expect("Sanity test failed.");
		})
	}
}

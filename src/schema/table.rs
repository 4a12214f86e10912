//! 内置命令表
//!
//! 以静态数据声明全部命令，进程首次访问时编译正则并校验自洽性

use super::patterns as pat;
use super::spec::{ArgumentSpec, CommandSchema, CommandSpec};
use crate::error::SchemaError;
use std::sync::OnceLock;

pub const GROUP_ACCOUNT: &str = "Account Management";
pub const GROUP_ID: &str = "Blockstack ID Management";
pub const GROUP_NAMESPACE: &str = "Namespace Operations";
pub const GROUP_KEYS: &str = "Key Management";
pub const GROUP_GAIA: &str = "Gaia";
pub const GROUP_PEER: &str = "Peer Services";
pub const GROUP_QUERY: &str = "Querying Blockstack IDs";
pub const GROUP_UTILITIES: &str = "Utilities";

/// 参数的静态声明
struct ArgDef {
    name: &'static str,
    kind: &'static str,
    pattern: Option<&'static str>,
}

/// 命令的静态声明
struct CommandDef {
    name: &'static str,
    group: &'static str,
    min_args: usize,
    args: &'static [ArgDef],
    help: &'static str,
}

const fn arg(name: &'static str, kind: &'static str, pattern: &'static str) -> ArgDef {
    ArgDef {
        name,
        kind,
        pattern: Some(pattern),
    }
}

const fn any(name: &'static str, kind: &'static str) -> ArgDef {
    ArgDef {
        name,
        kind,
        pattern: None,
    }
}

static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "announce",
        group: GROUP_PEER,
        min_args: 2,
        args: &[
            arg("message_hash", "zonefile_hash", pat::ZONEFILE_HASH),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Broadcast a message on the blockchain for subscribers to read. The message \
               must be stored on the peer network first, and MESSAGE_HASH is its RIPEMD160 \
               hash. OWNER_KEY pays for the announcement.",
    },
    CommandDef {
        name: "balance",
        group: GROUP_ACCOUNT,
        min_args: 1,
        args: &[arg("address", "address", pat::ADDRESS)],
        help: "Query the balance of an account. Returns the balances of every token type \
               the account holds, in their smallest denominations.",
    },
    CommandDef {
        name: "block_height",
        group: GROUP_UTILITIES,
        min_args: 0,
        args: &[],
        help: "Query the current block height as seen by the configured node.",
    },
    CommandDef {
        name: "broadcast",
        group: GROUP_UTILITIES,
        min_args: 1,
        args: &[arg("raw_tx", "hex_string", pat::RAW_TRANSACTION)],
        help: "Broadcast a signed, hex-encoded transaction through the configured \
               broadcaster.\n\nWith -x or -e the transaction is echoed back and not sent.",
    },
    CommandDef {
        name: "convert_address",
        group: GROUP_ACCOUNT,
        min_args: 1,
        args: &[arg("address", "address", pat::ADDRESS)],
        help: "Convert a Bitcoin address to a Stacks address and vice versa.",
    },
    CommandDef {
        name: "decrypt_keychain",
        group: GROUP_KEYS,
        min_args: 1,
        args: &[
            arg("encrypted_backup_phrase", "encrypted_backup_phrase", pat::ENCRYPTED_MNEMONIC),
            any("password", "string"),
        ],
        help: "Decrypt an encrypted backup phrase with a password. If PASSWORD is not \
               given, it is read interactively.",
    },
    CommandDef {
        name: "docs",
        group: GROUP_UTILITIES,
        min_args: 0,
        args: &[],
        help: "Print the full reference documentation for every command.",
    },
    CommandDef {
        name: "encrypt_keychain",
        group: GROUP_KEYS,
        min_args: 1,
        args: &[
            arg("backup_phrase", "backup_phrase", pat::MNEMONIC),
            any("password", "string"),
        ],
        help: "Encrypt a 12-word backup phrase, which can be decrypted later with \
               decrypt_keychain. If PASSWORD is not given, it is read interactively.",
    },
    CommandDef {
        name: "gaia_deletefile",
        group: GROUP_GAIA,
        min_args: 3,
        args: &[
            arg("gaia_hub", "url", pat::URL),
            arg("app_private_key", "private_key", pat::PRIVATE_KEY),
            any("gaia_filename", "filename"),
            arg("was_signed", "boolean", pat::BOOLEAN),
        ],
        help: "Delete a file in a Gaia hub, as well as its signature metadata if \
               WAS_SIGNED is set.",
    },
    CommandDef {
        name: "gaia_dump_bucket",
        group: GROUP_GAIA,
        min_args: 5,
        args: &[
            arg("name_or_id_address", "name_or_id_address", pat::NAME_OR_ID_ADDRESS),
            arg("app_origin", "url", pat::URL),
            arg("gaia_hub", "url", pat::URL),
            arg("backup_phrase", "backup_phrase", pat::MNEMONIC),
            arg("dump_dir", "path", pat::PATH),
        ],
        help: "Download the contents of a Gaia hub bucket to a given directory. GAIA_HUB \
               must be the write endpoint of the hub, and the bucket is derived from the \
               application keys for APP_ORIGIN.",
    },
    CommandDef {
        name: "gaia_getfile",
        group: GROUP_GAIA,
        min_args: 3,
        args: &[
            arg("blockstack_id", "blockstack_id", pat::NAME_OR_ID_ADDRESS),
            arg("app_origin", "url", pat::URL),
            any("filename", "filename"),
            arg("app_private_key", "private_key", pat::PRIVATE_KEY),
            arg("decrypt", "boolean", pat::BOOLEAN),
            arg("verify", "boolean", pat::BOOLEAN),
        ],
        help: "Get a file from another user's Gaia hub. Prints the file data to stdout.\n\n\
               To decrypt the file, pass APP_PRIVATE_KEY and set DECRYPT. To verify a \
               signed file, set VERIFY.",
    },
    CommandDef {
        name: "gaia_listfiles",
        group: GROUP_GAIA,
        min_args: 2,
        args: &[
            arg("gaia_hub", "url", pat::URL),
            arg("app_private_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "List all the files in a Gaia hub bucket. The bucket is identified by the \
               application private key.",
    },
    CommandDef {
        name: "gaia_putfile",
        group: GROUP_GAIA,
        min_args: 4,
        args: &[
            arg("gaia_hub", "url", pat::URL),
            arg("app_private_key", "private_key", pat::PRIVATE_KEY),
            arg("data_path", "path", pat::PATH),
            any("gaia_filename", "filename"),
            arg("encrypt", "boolean", pat::BOOLEAN),
            arg("sign", "boolean", pat::BOOLEAN),
        ],
        help: "Put a file into a Gaia hub bucket. Prints the URL of the stored file.\n\n\
               Set ENCRYPT to encrypt the data with the application key, and SIGN to store \
               a detached signature alongside it.",
    },
    CommandDef {
        name: "gaia_sethub",
        group: GROUP_GAIA,
        min_args: 5,
        args: &[
            arg("blockstack_id", "blockstack_id", pat::NAME_OR_ID_ADDRESS),
            arg("owner_gaia_hub", "url", pat::URL),
            arg("app_origin", "url", pat::URL),
            arg("app_gaia_hub", "url", pat::URL),
            arg("backup_phrase", "backup_phrase", pat::MNEMONIC),
        ],
        help: "Set the Gaia hub for an application for a Blockstack ID. The profile is \
               updated in OWNER_GAIA_HUB to point APP_ORIGIN at APP_GAIA_HUB.",
    },
    CommandDef {
        name: "get_account_at",
        group: GROUP_ACCOUNT,
        min_args: 2,
        args: &[
            arg("address", "address", pat::ADDRESS),
            arg("blocknumber", "integer", pat::UNSIGNED),
        ],
        help: "Query the list of token debits and credits on a given address that \
               occurred at a particular block height.",
    },
    CommandDef {
        name: "get_account_history",
        group: GROUP_ACCOUNT,
        min_args: 2,
        args: &[
            arg("address", "address", pat::ADDRESS),
            arg("page", "integer", pat::UNSIGNED),
        ],
        help: "Query the history of account debits and credits over a given block range. \
               Results are paginated; pages start at 0.",
    },
    CommandDef {
        name: "get_address",
        group: GROUP_KEYS,
        min_args: 1,
        args: &[arg("private_key", "private_key", pat::PRIVATE_KEY)],
        help: "Get the address of a private key or multisig private key bundle.",
    },
    CommandDef {
        name: "get_app_keys",
        group: GROUP_KEYS,
        min_args: 3,
        args: &[
            arg("backup_phrase", "backup_phrase", pat::MNEMONIC),
            arg("name_or_id_address", "name_or_id_address", pat::NAME_OR_ID_ADDRESS),
            arg("app_origin", "url", pat::URL),
        ],
        help: "Get the application private key from a 12-word backup phrase and a name \
               or ID-address. This is the key used to sign and encrypt data in Gaia.",
    },
    CommandDef {
        name: "get_blockchain_history",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("page", "integer", pat::UNSIGNED),
        ],
        help: "Get the low-level blockchain-hosted history of operations on a Blockstack \
               ID. Results are paginated; pages start at 0.",
    },
    CommandDef {
        name: "get_blockchain_record",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("name", "blockstack_id", pat::NAME)],
        help: "Get the low-level blockchain-hosted state for a Blockstack ID.",
    },
    CommandDef {
        name: "get_namespace_blockchain_record",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("namespace_id", "namespace_id", pat::NAMESPACE_ID)],
        help: "Get the low-level blockchain-hosted state for a Blockstack namespace.",
    },
    CommandDef {
        name: "get_owner_keys",
        group: GROUP_KEYS,
        min_args: 1,
        args: &[
            arg("backup_phrase", "backup_phrase", pat::MNEMONIC),
            arg("index", "integer", pat::UNSIGNED),
        ],
        help: "Get the list of owner private keys and ID-addresses from a 12-word backup \
               phrase. Pass INDEX to derive that many keys; defaults to 1.",
    },
    CommandDef {
        name: "get_payment_key",
        group: GROUP_KEYS,
        min_args: 1,
        args: &[arg("backup_phrase", "backup_phrase", pat::MNEMONIC)],
        help: "Get the payment private key from a 12-word backup phrase.",
    },
    CommandDef {
        name: "get_zonefile",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("name", "blockstack_id", pat::NAME)],
        help: "Get the current zone file for a Blockstack ID.",
    },
    CommandDef {
        name: "help",
        group: GROUP_UTILITIES,
        min_args: 0,
        args: &[arg("command", "command", pat::COMMAND_NAME)],
        help: "Get the usage string for a CLI command. Without COMMAND, list every \
               command.",
    },
    CommandDef {
        name: "lookup",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("name", "blockstack_id", pat::NAME)],
        help: "Get and authenticate the profile and zone file for a Blockstack ID.",
    },
    CommandDef {
        name: "make_keychain",
        group: GROUP_KEYS,
        min_args: 0,
        args: &[arg("backup_phrase", "backup_phrase", pat::MNEMONIC)],
        help: "Generate the owner and payment private keys, optionally from a given \
               12-word backup phrase. If no backup phrase is given, a new one is generated.",
    },
    CommandDef {
        name: "make_zonefile",
        group: GROUP_ID,
        min_args: 3,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("id_address", "id_address", pat::ID_ADDRESS),
            arg("gaia_url_prefix", "url", pat::URL),
            arg("resolver_url", "url", pat::URL),
        ],
        help: "Generate a zone file for a Blockstack ID with the given profile URL. If \
               RESOLVER_URL is given, it is added to the zone file as a URI record.",
    },
    CommandDef {
        name: "name_import",
        group: GROUP_NAMESPACE,
        min_args: 4,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("id_address", "id_address", pat::ID_ADDRESS),
            arg("gaia_url_prefix", "url", pat::URL),
            arg("reveal_key", "private_key", pat::PRIVATE_KEY),
            arg("zonefile", "path", pat::PATH),
            arg("zonefile_hash", "zonefile_hash", pat::ZONEFILE_HASH),
        ],
        help: "Import a name into a namespace you revealed. The REVEAL_KEY must be the \
               private key for the namespace reveal address.\n\nIf ZONEFILE is not given, \
               a default zone file pointing at GAIA_URL_PREFIX is generated.",
    },
    CommandDef {
        name: "namespace_preorder",
        group: GROUP_NAMESPACE,
        min_args: 3,
        args: &[
            arg("namespace_id", "namespace_id", pat::NAMESPACE_ID),
            arg("reveal_address", "address", pat::ADDRESS),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Preorder a namespace. This is the first of three steps to creating a \
               namespace; it must be followed by namespace_reveal and namespace_ready.",
    },
    CommandDef {
        name: "namespace_ready",
        group: GROUP_NAMESPACE,
        min_args: 2,
        args: &[
            arg("namespace_id", "namespace_id", pat::NAMESPACE_ID),
            arg("reveal_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Launch a revealed namespace. Once launched, anyone can register names in \
               it and the reveal key can no longer import names.",
    },
    CommandDef {
        name: "namespace_reveal",
        group: GROUP_NAMESPACE,
        min_args: 10,
        args: &[
            arg("namespace_id", "namespace_id", pat::NAMESPACE_ID),
            arg("reveal_address", "address", pat::ADDRESS),
            arg("version", "2-byte-integer", pat::UNSIGNED),
            arg("lifetime", "4-byte-integer", pat::UNSIGNED),
            arg("coefficient", "1-byte-integer", pat::UNSIGNED),
            arg("base", "1-byte-integer", pat::UNSIGNED),
            arg("price_buckets", "csv-of-16-nybbles", pat::PRICE_BUCKETS),
            arg("nonalpha_discount", "nybble", pat::UNSIGNED),
            arg("no_vowel_discount", "nybble", pat::UNSIGNED),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Reveal a preordered namespace and set its pricing parameters. The price of \
               a name is computed from COEFFICIENT, BASE and PRICE_BUCKETS, and discounted \
               by NONALPHA_DISCOUNT and NO_VOWEL_DISCOUNT.\n\nLIFETIME is the number of \
               blocks a name lasts before it must be renewed; 0 means forever.",
    },
    CommandDef {
        name: "names",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("id_address", "id_address", pat::ID_ADDRESS)],
        help: "Get the list of Blockstack IDs owned by an ID-address.",
    },
    CommandDef {
        name: "price",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("name", "blockstack_id", pat::NAME)],
        help: "Get the price of an on-chain Blockstack ID. Its namespace must already exist.",
    },
    CommandDef {
        name: "price_namespace",
        group: GROUP_NAMESPACE,
        min_args: 1,
        args: &[arg("namespace_id", "namespace_id", pat::NAMESPACE_ID)],
        help: "Get the price of a namespace.",
    },
    CommandDef {
        name: "profile_sign",
        group: GROUP_ID,
        min_args: 2,
        args: &[
            arg("profile", "path", pat::PATH),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Sign a JSON profile file with an owner private key. Prints the signed \
               profile token.",
    },
    CommandDef {
        name: "profile_store",
        group: GROUP_ID,
        min_args: 4,
        args: &[
            arg("user_id", "name_or_id_address", pat::NAME_OR_ID_ADDRESS),
            arg("profile", "path", pat::PATH),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("gaia_hub", "url", pat::URL),
        ],
        help: "Store a profile on a Gaia hub. USER_ID can be a name or an ID-address, and \
               the profile is signed with OWNER_KEY before upload.",
    },
    CommandDef {
        name: "profile_verify",
        group: GROUP_ID,
        min_args: 2,
        args: &[
            arg("profile", "path", pat::PATH),
            arg("id_address", "id_address", pat::ID_ADDRESS),
        ],
        help: "Verify a JSON web token signed by the owner of ID_ADDRESS.",
    },
    CommandDef {
        name: "register",
        group: GROUP_ID,
        min_args: 4,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            arg("gaia_hub", "url", pat::URL),
            arg("zonefile", "path", pat::PATH),
        ],
        help: "Register a name the easy way. This sends the preorder and register \
               transactions, waits for them to confirm, and replicates the zone file.\n\n\
               If ZONEFILE is not given, a default zone file pointing at GAIA_HUB is used.",
    },
    CommandDef {
        name: "register_addr",
        group: GROUP_ID,
        min_args: 4,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("id_address", "id_address", pat::ID_ADDRESS),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            arg("gaia_url", "url", pat::URL),
            arg("zonefile", "path", pat::PATH),
        ],
        help: "Register a name to a single ID-address. Unlike register, no owner key is \
               needed; the name is sent directly to ID_ADDRESS.",
    },
    CommandDef {
        name: "register_subdomain",
        group: GROUP_ID,
        min_args: 4,
        args: &[
            arg("name", "blockstack_id", pat::SUBDOMAIN),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("gaia_hub", "url", pat::URL),
            arg("registrar", "url", pat::URL),
            arg("zonefile", "path", pat::PATH),
        ],
        help: "Register a subdomain through an off-chain registrar. The registrar batches \
               subdomain registrations into a single on-chain zone file update.",
    },
    CommandDef {
        name: "renew",
        group: GROUP_ID,
        min_args: 3,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            arg("new_id_address", "id_address", pat::ID_ADDRESS),
            arg("zonefile", "path", pat::PATH),
            arg("zonefile_hash", "zonefile_hash", pat::ZONEFILE_HASH),
        ],
        help: "Renew a name. Optionally transfer it to NEW_ID_ADDRESS and set a new zone \
               file in the same transaction.",
    },
    CommandDef {
        name: "revoke",
        group: GROUP_ID,
        min_args: 3,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Revoke a name. This renders it unusable until it expires.",
    },
    CommandDef {
        name: "send_btc",
        group: GROUP_ACCOUNT,
        min_args: 3,
        args: &[
            arg("recipient_address", "address", pat::ADDRESS),
            arg("amount", "satoshis", pat::UNSIGNED),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Send some Bitcoin (in satoshis) from a payment key to an address. Up to \
               the given amount will be spent, but likely less since transaction fees \
               are deducted.",
    },
    CommandDef {
        name: "send_tokens",
        group: GROUP_ACCOUNT,
        min_args: 4,
        args: &[
            arg("address", "address", pat::ADDRESS),
            arg("type", "token_type", pat::TOKEN_TYPE),
            arg("amount", "integer", pat::UNSIGNED),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            any("memo", "string"),
        ],
        help: "Send tokens to the given ADDRESS. The amount is in the smallest \
               denomination of TYPE. An optional MEMO is attached to the transfer.",
    },
    CommandDef {
        name: "transfer",
        group: GROUP_ID,
        min_args: 5,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("new_id_address", "id_address", pat::ID_ADDRESS),
            arg("keep_zonefile", "boolean", pat::BOOLEAN),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Transfer a Blockstack ID to a new address. Set KEEP_ZONEFILE to keep the \
               current zone file; otherwise it is cleared.",
    },
    CommandDef {
        name: "tx_preorder",
        group: GROUP_ID,
        min_args: 3,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("id_address", "id_address", pat::ID_ADDRESS),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
        ],
        help: "Generate and send a NAME_PREORDER transaction for a Blockstack ID. This is \
               the first half of the low-level two-step registration.",
    },
    CommandDef {
        name: "tx_register",
        group: GROUP_ID,
        min_args: 3,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("id_address", "id_address", pat::ID_ADDRESS),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            arg("zonefile", "path", pat::PATH),
            arg("zonefile_hash", "zonefile_hash", pat::ZONEFILE_HASH),
        ],
        help: "Generate and send a NAME_REGISTRATION transaction for a preordered \
               Blockstack ID. The zone file must be replicated separately with \
               zonefile_push.",
    },
    CommandDef {
        name: "update",
        group: GROUP_ID,
        min_args: 4,
        args: &[
            arg("name", "blockstack_id", pat::NAME),
            arg("zonefile", "path", pat::PATH),
            arg("owner_key", "private_key", pat::PRIVATE_KEY),
            arg("payment_key", "private_key", pat::PRIVATE_KEY),
            arg("zonefile_hash", "zonefile_hash", pat::ZONEFILE_HASH),
        ],
        help: "Update the zone file for a Blockstack ID. If ZONEFILE_HASH is given, only \
               the hash is sent on-chain and ZONEFILE is replicated separately.",
    },
    CommandDef {
        name: "whois",
        group: GROUP_QUERY,
        min_args: 1,
        args: &[arg("name", "blockstack_id", pat::NAME)],
        help: "Look up the zone file and owner of a Blockstack ID.",
    },
    CommandDef {
        name: "zonefile_push",
        group: GROUP_PEER,
        min_args: 1,
        args: &[arg("zonefile", "path", pat::PATH)],
        help: "Push a zone file to the peer network. The zone file's hash must already be \
               announced on-chain by a register or update transaction.",
    },
];

/// 由静态声明构建命令表
fn build_schema() -> Result<CommandSchema, SchemaError> {
    let mut commands = Vec::with_capacity(COMMANDS.len());

    for def in COMMANDS {
        let mut arguments = Vec::with_capacity(def.args.len());
        for arg_def in def.args {
            let spec = ArgumentSpec::new(arg_def.name, arg_def.kind, arg_def.pattern).map_err(
                |e| SchemaError::InvalidPattern {
                    command: def.name.to_string(),
                    argument: arg_def.name.to_string(),
                    message: e.to_string(),
                },
            )?;
            arguments.push(spec);
        }
        commands.push(CommandSpec::new(
            def.name,
            def.group,
            def.min_args,
            arguments,
            def.help,
        ));
    }

    CommandSchema::new(commands)
}

static BUILTIN_SCHEMA: OnceLock<CommandSchema> = OnceLock::new();

/// 获取内置命令表
///
/// 命令表编写错误属于程序缺陷，首次访问时直接终止。
pub fn builtin() -> &'static CommandSchema {
    BUILTIN_SCHEMA.get_or_init(|| match build_schema() {
        Ok(schema) => schema,
        Err(e) => panic!("内置命令表无效: {e}"),
    })
}

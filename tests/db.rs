use rocks_workload::rocksdb::*;
use tempdir::TempDir;

#[test]
fn it_works() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();

    let opt = Options::default()
        .map_db_options(|dbopt| dbopt.create_if_missing(true).increase_parallelism(2))
        .map_cf_options(|cfopt| cfopt.optimize_level_style_compaction(8 * 1024 * 1024));
    let db = DB::open(&opt, tmp_dir.path());
    assert!(db.is_ok(), "err => {:?}", db);
    let db = db.unwrap();

    assert_eq!(db.name(), tmp_dir.path());
    assert!(db.put(&WriteOptions::default(), b"my key", b"my value").is_ok());
    assert_eq!(db.get(&ReadOptions::default(), b"my key").unwrap(), b"my value");
}

#[test]
fn write_batch_is_atomic_and_readable() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
    let db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();

    let mut batch = WriteBatch::new();
    for i in 0..100 {
        batch.put(format!("key{}", i).as_bytes(), format!("value{}", i).as_bytes());
    }
    assert_eq!(batch.count(), 100);
    assert!(db.write(&WriteOptions::default(), batch).is_ok());

    for i in 0..100 {
        let val = db.get(&ReadOptions::default().fill_cache(false), format!("key{}", i).as_bytes());
        assert_eq!(val.unwrap(), format!("value{}", i).as_bytes());
    }
    let ret = db.get(&ReadOptions::default(), b"key100");
    assert!(ret.is_err() && ret.unwrap_err().is_not_found());
}

#[test]
fn empty_batch_is_a_noop() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
    let db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();

    assert!(db.write(&WriteOptions::default(), WriteBatch::new()).is_ok());
    assert_eq!(db.get_int_property("rocksdb.estimate-num-keys"), Some(0));
}

#[test]
fn get_prop() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
    let db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();

    assert!(db
        .put(&WriteOptions::default().sync(true), b"long-key", vec![b'A'; 1024].as_ref())
        .is_ok());

    // dump status
    println!("stats => {}", db.get_property("rocksdb.stats").unwrap());
    assert!(db.get_int_property("rocksdb.size-all-mem-tables").unwrap() > 0);
    assert_eq!(db.get_property("rocksdb.no-such-property"), None);
    assert_eq!(db.get_int_property("rocksdb.no-such-property"), None);
}

#[test]
fn tickers_count_bytes() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
    let db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();

    let before = db.get_statistics().unwrap();
    assert!(db.put(&WriteOptions::default(), b"name", vec![b'x'; 4096].as_ref()).is_ok());
    let after_put = db.get_statistics().unwrap();
    assert!(after_put.bytes_written >= before.bytes_written + 4096);
    assert_eq!(after_put.keys_written, before.keys_written + 1);

    assert_eq!(db.get(&ReadOptions::default(), b"name").unwrap().len(), 4096);
    let after_get = db.get_statistics().unwrap();
    assert!(after_get.bytes_read >= after_put.bytes_read + 4096);
    assert_eq!(db.get_ticker_count(Ticker::NumberKeysRead).unwrap(), after_get.keys_read);
}

#[test]
fn reopen_keeps_data() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();

    {
        let db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();
        let _ = db.put(&WriteOptions::default().disable_wal(false), b"name", b"BH1XUW");
        db.close();
    }

    let db = DB::open(Options::default(), tmp_dir.path()).unwrap();
    let val = db.get(&ReadOptions::default().verify_checksums(true), b"name");
    assert_eq!(val.unwrap(), b"BH1XUW");
}

#[test]
fn second_open_is_locked_out() {
    let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
    let _db = DB::open(Options::default_instance(), tmp_dir.path()).unwrap();

    let ret = DB::open(Options::default_instance(), tmp_dir.path());
    assert!(ret.is_err());
    println!("err => {}", ret.unwrap_err());
}
